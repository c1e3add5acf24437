mod drawer;
mod labels;

pub use self::drawer::{edge_label_alpha, label_fits_inside, DrawContext, Drawer};
pub use self::labels::Labels;
