/// Only the top-left and bottom-right corners are rounded.
pub fn masked_corners(radius: f32) -> egui::Rounding {
    egui::Rounding {
        nw: radius,
        ne: 0.0,
        sw: 0.0,
        se: radius,
    }
}

pub fn rounded_panel<R>(
    ui: &mut egui::Ui,
    radius: f32,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> egui::InnerResponse<R> {
    egui::Frame::none()
        .fill(ui.visuals().faint_bg_color)
        .stroke(ui.visuals().widgets.noninteractive.bg_stroke)
        .rounding(masked_corners(radius))
        .inner_margin(egui::Margin::same(12.0))
        .show(ui, add_contents)
}
