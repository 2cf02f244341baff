use strum::{Display, EnumIter, IntoStaticStr};

/// The kinds of QC report a sequencing run produces, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum MetricCategory {
    /// Read mapping and alignment summary
    Mapping,

    /// Whole-genome coverage summary
    Wgs,

    /// Coverage over the QC target region
    QcRegion,

    /// Variant caller summary
    Vc,

    /// Copy-number caller summary
    Cnv,
}
