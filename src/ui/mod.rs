/// UI layer: top bar, dashboard sections, and charts.
pub mod charts;
pub mod panels;
