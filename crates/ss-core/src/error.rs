use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug, PartialEq)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),

    /// Only RGB (3) and RGBA (4) buffers are supported.
    #[error("Nombre de canaux non supporté : {channels} (attendu 3 ou 4)")]
    UnsupportedChannels {
        /// The channel count that was supplied.
        channels: usize,
    },

    /// Invalid width/height dimensions.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Sample buffer length does not match width × height × channels.
    #[error("Taille de buffer invalide : {actual} octets, attendu {expected}")]
    BufferSize {
        /// Expected number of samples.
        expected: usize,
        /// Number of samples supplied.
        actual: usize,
    },
}
