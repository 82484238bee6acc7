// Copyright 2025 the Gridlogic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element kinds, definitions, and attribute payloads.

use alloc::string::String;

use crate::color::Color;
use crate::connection_count::ConnectionCount;
use crate::offset::Offset;
use crate::orientation::Orientation;
use crate::point::Point;
use crate::time::Delay;

/// Kind of a logic item.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LogicItemType {
    /// Single-input buffer.
    Buffer,
    /// N-input AND gate.
    And,
    /// N-input OR gate.
    Or,
    /// N-input XOR gate.
    Xor,
    /// Interactive push button.
    Button,
    /// Output indicator.
    Led,
    /// Free-running clock source.
    ClockGenerator,
    /// JK flip-flop.
    FlipflopJk,
    /// D flip-flop.
    FlipflopD,
    /// Master-slave D flip-flop.
    FlipflopMsD,
    /// D latch.
    LatchD,
    /// 8-bit shift register.
    ShiftRegister,
    /// Multi-digit number display.
    DisplayNumber,
    /// ASCII character display.
    DisplayAscii,
    /// Nested circuit.
    SubCircuit,
}

/// Kind of a decoration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DecorationType {
    /// A free-floating text label.
    TextElement,
}

/// Width and height of a rectangular decoration, in grid cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Size2d {
    /// Horizontal extent.
    pub width: Offset,
    /// Vertical extent.
    pub height: Offset,
}

impl Size2d {
    /// Creates a size from raw cell counts.
    #[must_use]
    pub const fn new(width: u16, height: u16) -> Self {
        Self {
            width: Offset::new(width),
            height: Offset::new(height),
        }
    }
}

/// Horizontal alignment of text inside its box.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum HorizontalAlignment {
    /// Align to the left edge.
    #[default]
    Left,
    /// Center between the edges.
    Center,
    /// Align to the right edge.
    Right,
}

/// Font style of a text element.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextStyle {
    /// Regular weight.
    #[default]
    Regular,
    /// Bold weight.
    Bold,
    /// Italic slant.
    Italic,
    /// Monospaced face.
    Monospace,
}

/// Attributes of a clock generator.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClockGeneratorAttrs {
    /// User-visible name.
    pub name: String,
    /// Length of one half or full period, see `is_symmetric`.
    pub period: Delay,
    /// Whether on- and off-phase have equal length.
    pub is_symmetric: bool,
    /// Whether the simulation UI shows the generator's controls.
    pub show_simulation_controls: bool,
}

impl Default for ClockGeneratorAttrs {
    fn default() -> Self {
        Self {
            name: String::new(),
            period: Delay::from_millis(100),
            is_symmetric: true,
            show_simulation_controls: true,
        }
    }
}

/// Attributes of a text element decoration.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextElementAttrs {
    /// The displayed text.
    pub text: String,
    /// Horizontal alignment inside the element box.
    pub horizontal_alignment: HorizontalAlignment,
    /// Font style.
    pub text_style: TextStyle,
    /// Text color.
    pub text_color: Color,
}

impl Default for TextElementAttrs {
    fn default() -> Self {
        Self {
            text: String::new(),
            horizontal_alignment: HorizontalAlignment::default(),
            text_style: TextStyle::default(),
            text_color: Color::BLACK,
        }
    }
}

/// Everything needed to create a logic item, minus its position.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LogicItemDefinition {
    /// The element kind.
    pub logicitem_type: LogicItemType,
    /// Number of inputs, within the kind's declared range.
    pub input_count: ConnectionCount,
    /// Number of outputs, within the kind's declared range.
    pub output_count: ConnectionCount,
    /// Element orientation, compatible with the kind's direction policy.
    pub orientation: Orientation,
    /// Clock attributes; present iff the kind is a clock generator.
    pub attrs_clock_generator: Option<ClockGeneratorAttrs>,
}

/// Everything needed to create a decoration, minus its position.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DecorationDefinition {
    /// The decoration kind.
    pub decoration_type: DecorationType,
    /// Rectangular extent.
    pub size: Size2d,
    /// Text attributes; present iff the kind is a text element.
    pub attrs_text_element: Option<TextElementAttrs>,
}

/// A decoration definition together with its position.
///
/// The self-contained value needed to re-create a decoration, used by the
/// undo machinery.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PlacedDecoration {
    /// The decoration definition.
    pub definition: DecorationDefinition,
    /// Grid position of the decoration origin.
    pub position: Point,
}

/// The inputs of all per-type geometry calculations.
///
/// A value type, so geometry of hypothetical placements can be computed
/// without touching the layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LayoutCalculationData {
    /// The element kind.
    pub logicitem_type: LogicItemType,
    /// Grid position of the element origin.
    pub position: Point,
    /// Number of inputs.
    pub input_count: ConnectionCount,
    /// Number of outputs.
    pub output_count: ConnectionCount,
    /// Element orientation.
    pub orientation: Orientation,
}

/// The inputs of decoration geometry calculations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DecorationCalculationData {
    /// Grid position of the decoration origin.
    pub position: Point,
    /// Rectangular extent.
    pub size: Size2d,
    /// The decoration kind.
    pub decoration_type: DecorationType,
}

impl DecorationCalculationData {
    /// The corner opposite the origin, if representable on the grid.
    #[must_use]
    pub fn max_corner(&self) -> Option<Point> {
        let x = self
            .position
            .x
            .checked_add_delta(i32::from(self.size.width.value()))
            .ok()?;
        let y = self
            .position
            .y
            .checked_add_delta(i32::from(self.size.height.value()))
            .ok()?;
        Some(Point { x, y })
    }
}

