pub mod merge;
pub mod outputs;
pub mod samplesheet;
