//! Historical dataset and the descriptive statistics of the exploratory view.

#[allow(clippy::module_inception)]
mod dataset;
mod report;

pub use dataset::{Dataset, DatasetRow};
pub use report::{
    BoxSummary, CORRELATION_VARIABLES, ClassCount, CorrelationMatrix, ExploratoryReport,
    ScatterPoint, pearson, quantile,
};
