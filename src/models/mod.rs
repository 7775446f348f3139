//! Defect decay-rate models.

pub mod decay;

pub use decay::DecayRateModel;
