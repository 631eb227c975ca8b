pub mod acquire;
pub mod config;
pub mod demod;
pub mod error;
pub mod filter;
pub mod measure;
pub mod psd;
pub mod simulation;
pub mod storage;
pub mod trace;
pub mod tracing_init;

pub use acquire::{AcquisitionCycle, MeasurementPlan, ResultSink, SpectrumSource};
pub use config::EngineConfig;
pub use demod::{Demodulator, Mode};
pub use error::Error;
pub use filter::FilterKernel;
pub use measure::{
    find_spurs, measure_acpr, measure_channel_power, measure_obw, measure_phase_noise,
    AcprResult, Measurement, PhaseNoiseProfile, SpurResult,
};
pub use trace::{IqBlock, SpectrumTrace};
