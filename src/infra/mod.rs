//! Инфраструктурный слой вокруг движка стола:
//! - маппинги между engine и API (снимки для фронта);
//! - общий стол под одним замком для продюсера и потребителя;
//! - симуляция детектора для стресс-прогонов (только native).

pub mod mapping;
#[cfg(not(target_arch = "wasm32"))]
pub mod rng;
pub mod shared;

pub use mapping::*;
#[cfg(not(target_arch = "wasm32"))]
pub use rng::*;
pub use shared::SharedTable;
