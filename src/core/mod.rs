pub mod line_series;
pub mod metrics;
pub mod price_scale;
pub mod primitives;
pub mod scale;
pub mod symbol;
pub mod ticks;
pub mod time_scale;
pub mod types;

pub use line_series::{LinePath, LineSegment, project_series_path, series_has_values};
pub use metrics::SeriesMetrics;
pub use price_scale::{PriceScale, PriceScaleTuning};
pub use scale::LinearScale;
pub use symbol::{MAX_SYMBOL_LEN, POPULAR_SYMBOLS, SymbolError, TickerSymbol};
pub use ticks::{TimeTick, TimeTickInterval, nice_ticks, time_ticks};
pub use time_scale::TimeScale;
pub use types::{Margins, PricePoint, SeriesKind, Viewport, sorted_by_date};
