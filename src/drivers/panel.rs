//! Fixed-layout text panel for the 128×64 monochrome display.
//!
//! Four text slots, one per [`Field`]:
//!
//! ```text
//! ┌────────────────────────────┐
//! │ LUX            (10×20)     │  y = 0
//! │ 1234.567       (10×20)     │  y = 20
//! │                            │
//! │ GAIN (A) = HIGH   (6×10)   │  y = 42
//! │ IWIN (B) = 400MS  (6×10)   │  y = 53
//! └────────────────────────────┘
//! ```
//!
//! Text is buffered per slot; [`TextPanel::redraw`] only touches the bus
//! when a slot changed since the last frame.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_10X20};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

use crate::app::display::{Field, FieldText};
use crate::error::DisplayError;

/// A draw target that needs an explicit present step (buffered displays).
pub trait Panel: DrawTarget<Color = BinaryColor> {
    /// Push the frame buffer to the glass.
    fn present(&mut self) -> Result<(), DisplayError>;
}

struct Slot {
    origin: Point,
    style: MonoTextStyle<'static, BinaryColor>,
}

fn slot_for(field: Field) -> Slot {
    let large = MonoTextStyle::new(&FONT_10X20, BinaryColor::On);
    let small = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    match field {
        Field::Header => Slot {
            origin: Point::new(0, 0),
            style: large,
        },
        Field::Value => Slot {
            origin: Point::new(0, 20),
            style: large,
        },
        Field::Gain => Slot {
            origin: Point::new(0, 42),
            style: small,
        },
        Field::IntegrationTime => Slot {
            origin: Point::new(0, 53),
            style: small,
        },
    }
}

pub struct TextPanel<D> {
    target: D,
    texts: [FieldText; 4],
    dirty: bool,
}

impl<D: Panel> TextPanel<D> {
    /// Wrap a display. The first [`redraw`](Self::redraw) always draws.
    pub fn new(target: D) -> Self {
        Self {
            target,
            texts: Default::default(),
            dirty: true,
        }
    }

    /// Replace one slot's text. Text longer than a slot is truncated.
    pub fn set_text(&mut self, field: Field, text: &str) {
        let slot = &mut self.texts[field.index()];
        if slot.as_str() == text {
            return;
        }
        slot.clear();
        for c in text.chars() {
            if slot.push(c).is_err() {
                break;
            }
        }
        self.dirty = true;
    }

    pub fn text(&self, field: Field) -> &str {
        self.texts[field.index()].as_str()
    }

    /// Clear, draw every slot and present, if anything changed.
    pub fn redraw(&mut self) -> Result<(), DisplayError> {
        if !self.dirty {
            return Ok(());
        }
        self.target
            .clear(BinaryColor::Off)
            .map_err(|_| DisplayError::Draw)?;
        for field in Field::ALL {
            let slot = slot_for(field);
            Text::with_baseline(
                self.texts[field.index()].as_str(),
                slot.origin,
                slot.style,
                Baseline::Top,
            )
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Draw)?;
        }
        self.target.present()?;
        self.dirty = false;
        Ok(())
    }

    pub fn release(self) -> D {
        self.target
    }
}
