pub mod impl_console;
#[cfg(test)]
pub mod impl_fake;
pub mod impl_gui;
pub mod interface;
pub mod rounded_panel;
