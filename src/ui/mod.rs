/// Presentation layer: panels (filters, toolbar, metric cards) and charts.

pub mod charts;
pub mod panels;
