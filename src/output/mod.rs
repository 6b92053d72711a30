pub mod formatter;

pub use formatter::{
    format_currency, format_feature_summary, format_feature_table, format_outcome,
    format_prediction, should_use_colors,
};
