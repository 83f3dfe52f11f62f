/// Runtime configuration for the converter, loaded from `TOPTERMS_*`
/// environment variables (see [`crate::config::load_app_config`]).
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Log level / filter directive passed to the tracing subscriber.
    pub log_level: String,
    /// Size of each read from the input file, in bytes.
    pub read_buffer_bytes: usize,
    /// Emit a progress event every this many output rows.
    pub progress_interval: u64,
}
