use eframe::egui::Color32;
use palette::{named, Srgb};

// ---------------------------------------------------------------------------
// Series colours
// ---------------------------------------------------------------------------

/// The plotted channels, in legend order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Temp1,
    Temp3,
    Current,
    Chamber,
}

impl Channel {
    pub const ALL: [Channel; 4] = [
        Channel::Temp1,
        Channel::Temp3,
        Channel::Current,
        Channel::Chamber,
    ];

    /// Legend label.
    pub fn label(self) -> &'static str {
        match self {
            Channel::Temp1 => "Temp1",
            Channel::Temp3 => "Temp3",
            Channel::Current => "Current (A)",
            Channel::Chamber => "Chamber Temperature",
        }
    }

    /// Fixed line / marker colour (CSS named colours).
    pub fn color(self) -> Color32 {
        let srgb = match self {
            Channel::Temp1 => named::RED,
            Channel::Temp3 => named::BLUE,
            Channel::Current => named::GREEN,
            Channel::Chamber => named::ORANGE,
        };
        to_color32(srgb)
    }
}

fn to_color32(c: Srgb<u8>) -> Color32 {
    Color32::from_rgb(c.red, c.green, c.blue)
}
