use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("plot area collapsed after margins: width={width}, height={height}")]
    InvalidPlotArea { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// No categories or no series keys to lay out.
    #[error("empty domain: {0}")]
    EmptyDomain(String),

    #[error("palette has {colors} colors for {series} series keys")]
    MismatchedPalette { colors: usize, series: usize },

    #[error("degenerate value range: every value equals {value}")]
    DegenerateValueRange { value: f64 },

    #[error("brush selection [{start}, {end}] covers no category midpoint")]
    InvalidBrushSelection { start: f64, end: f64 },
}
