pub(crate) mod menu;
pub(crate) mod picker;
pub(crate) mod prompts;
