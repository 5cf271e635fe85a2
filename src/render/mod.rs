pub(crate) mod frame;
pub(crate) mod style;
pub(crate) mod text;
