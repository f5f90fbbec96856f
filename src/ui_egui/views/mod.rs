mod palette;
pub mod table_view;

pub(crate) use palette::GridPalette;
