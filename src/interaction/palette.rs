//! The component palette across the top of the screen.

use serde::Serialize;
use tracing::debug;

use crate::circuit::{Position, Size};
use crate::components::ComponentKind;

/// Height of the palette strip; everything below it is workspace.
pub const DEFAULT_PANEL_HEIGHT: i32 = 120;

/// Extra vertical reach below the panel still accepted for a palette pick.
pub const SELECTION_TOLERANCE: i32 = 20;

/// Hit-box growth for the wire entry, which is the hardest to grab.
pub const WIRE_SELECTION_MARGIN: i32 = 40;

/// Hit-box growth for every other entry.
pub const SELECTION_MARGIN: i32 = 20;

/// One selectable component type in the palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaletteEntry {
    pub kind: ComponentKind,
    pub label: &'static str,
    pub description: &'static str,
    pub center: Position,
    pub size: Size,
}

impl PaletteEntry {
    const fn new(
        kind: ComponentKind,
        label: &'static str,
        description: &'static str,
        center: Position,
        size: Size,
    ) -> Self {
        Self {
            kind,
            label,
            description,
            center,
            size,
        }
    }

    /// Enlarged selection area.
    pub fn hit_size(&self) -> Size {
        match self.kind {
            ComponentKind::Wire => self.size.grow(WIRE_SELECTION_MARGIN),
            _ => self.size.grow(SELECTION_MARGIN),
        }
    }

    /// Inclusive test against the enlarged selection area.
    pub fn contains(&self, p: Position) -> bool {
        let hit = self.hit_size();
        (p.x - self.center.x).abs() <= hit.width / 2 && (p.y - self.center.y).abs() <= hit.height / 2
    }
}

/// Palette layout and selection highlight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    panel_height: i32,
    entries: Vec<PaletteEntry>,
    selected: Option<ComponentKind>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::standard()
    }
}

impl Palette {
    /// The standard five-entry layout, wire on the left.
    pub fn standard() -> Self {
        let y = 60;
        Self::new(
            DEFAULT_PANEL_HEIGHT,
            vec![
                PaletteEntry::new(
                    ComponentKind::Wire,
                    "Wire",
                    "Connector",
                    Position::new(100, y),
                    Size::new(120, 50),
                ),
                PaletteEntry::new(
                    ComponentKind::Battery,
                    "Battery",
                    "12V voltage source",
                    Position::new(250, y),
                    Size::new(120, 70),
                ),
                PaletteEntry::new(
                    ComponentKind::Lamp,
                    "Lamp",
                    "50Ω lamp load",
                    Position::new(400, y),
                    Size::new(100, 100),
                ),
                PaletteEntry::new(
                    ComponentKind::Resistor,
                    "Resistor",
                    "100Ω resistance",
                    Position::new(550, y),
                    Size::new(120, 50),
                ),
                PaletteEntry::new(
                    ComponentKind::Switch,
                    "Switch",
                    "ON/OFF switch",
                    Position::new(700, y),
                    Size::new(120, 70),
                ),
            ],
        )
    }

    /// Build a custom layout. Entries are hit-tested in the given order.
    pub fn new(panel_height: i32, entries: Vec<PaletteEntry>) -> Self {
        Self {
            panel_height,
            entries,
            selected: None,
        }
    }

    pub fn panel_height(&self) -> i32 {
        self.panel_height
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn entry(&self, kind: ComponentKind) -> Option<&PaletteEntry> {
        self.entries.iter().find(|e| e.kind == kind)
    }

    /// Kind last picked from the palette, for highlighting.
    pub fn selected(&self) -> Option<ComponentKind> {
        self.selected
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Whether `p` is inside the palette strip (releases here delete).
    pub fn is_in_panel(&self, p: Position) -> bool {
        p.y <= self.panel_height
    }

    /// Pick the component type under `p`, if any, and remember it.
    pub fn select(&mut self, p: Position) -> Option<ComponentKind> {
        if p.y > self.panel_height + SELECTION_TOLERANCE {
            return None;
        }
        let kind = self.entries.iter().find(|e| e.contains(p))?.kind;
        self.selected = Some(kind);
        debug!(kind = %kind, position = %p, "palette entry selected");
        Some(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_each_entry_at_center() {
        let mut palette = Palette::standard();
        for kind in ComponentKind::ALL {
            let center = palette.entry(kind).unwrap().center;
            assert_eq!(palette.select(center), Some(kind));
            assert_eq!(palette.selected(), Some(kind));
        }
    }

    #[test]
    fn test_wire_has_larger_reach() {
        let mut palette = Palette::standard();
        // wire: 120x50 + 40 -> half extents 80 x 45
        assert_eq!(palette.select(Position::new(20, 105)), Some(ComponentKind::Wire));
        // battery: 120x70 + 20 -> half extents 70 x 45; wire is tested first
        assert_eq!(palette.select(Position::new(179, 60)), Some(ComponentKind::Wire));
        assert_eq!(palette.select(Position::new(181, 60)), Some(ComponentKind::Battery));
    }

    #[test]
    fn test_select_bounds_inclusive() {
        let mut palette = Palette::standard();
        // lamp: 100x100 + 20 -> half extents 60; y reach limited by the tolerance check
        assert_eq!(palette.select(Position::new(460, 120)), Some(ComponentKind::Lamp));
        assert_eq!(palette.select(Position::new(461, 60)), None);
    }

    #[test]
    fn test_select_ignores_workspace() {
        let mut palette = Palette::standard();
        assert_eq!(palette.select(Position::new(400, 141)), None);
        assert_eq!(palette.selected(), None);
    }

    #[test]
    fn test_is_in_panel() {
        let palette = Palette::standard();
        assert!(palette.is_in_panel(Position::new(900, 120)));
        assert!(!palette.is_in_panel(Position::new(900, 121)));
    }
}
