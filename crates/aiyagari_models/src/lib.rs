//! # aiyagari_models (L2: Economic Primitives)
//!
//! Household preferences, firm technology and the factor prices that link
//! them.
//!
//! This crate provides:
//! - CRRA preferences with the log case and a consumption floor (`preferences`)
//! - Cobb-Douglas technology: marginal products, the rate implied by a
//!   capital stock, the wage implied by a rate, capital demand (`technology`)
//! - Factor prices derived from an interest rate (`prices`)
//! - `ModelError` for invalid parameters (`error`)
//!
//! ## Design Principles
//!
//! - **Validated construction**: every model is checked once in `new` and is
//!   immutable afterwards
//! - **Pure evaluation**: all methods are side-effect free and never fail
//!
//! ## Example
//!
//! ```
//! use aiyagari_models::prices::Prices;
//! use aiyagari_models::technology::CobbDouglas;
//!
//! let firm = CobbDouglas::new(0.36, 0.08).unwrap();
//! let prices = Prices::from_rate(0.03, &firm);
//! // Capital demanded at these prices clears the rental market
//! let k = firm.capital_demand(prices.rate);
//! assert!((firm.rate_from_capital(k) - 0.03).abs() < 1e-12);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod error;
pub mod preferences;
pub mod prices;
pub mod technology;

pub use error::ModelError;
pub use preferences::Crra;
pub use prices::Prices;
pub use technology::CobbDouglas;
