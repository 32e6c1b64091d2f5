//! # Text Rendering
//!
//! ASCII-art rendering of a floor: a legend, the room map cropped to the
//! written columns, and the list of encounters.

use crate::floor::{FloorResult, Room, RoomType};
use crate::rendering::FloorRenderer;

/// Two-character glyph for a room type.
pub fn sprite(room_type: RoomType) -> &'static str {
    match room_type {
        RoomType::None => "  ",
        RoomType::Start => "\\\\",
        RoomType::Staircase => "//",
        RoomType::Treasure => "$$",
        RoomType::Empty => "[]",
        RoomType::Safe => "<3",
        RoomType::GuardedTreasure => "X$",
        RoomType::Hazard => "/\\",
        RoomType::Death => "8X",
        RoomType::Enemy => "\\O",
    }
}

/// Renders floors as lines of plain text.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    /// Spaces before each map row
    pub margin: usize,
    /// Number of `~` between the border corners
    pub border_width: usize,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self {
            margin: 16,
            border_width: 60,
        }
    }

    fn border(&self) -> String {
        format!("*{}*", "~".repeat(self.border_width))
    }

    fn legend(&self) -> Vec<String> {
        let gap = "    ";
        let entry = |room_type: RoomType| format!("{} {}", sprite(room_type), room_type.name());

        let first = [
            RoomType::Start,
            RoomType::Staircase,
            RoomType::Treasure,
            RoomType::Empty,
            RoomType::Safe,
        ];
        let second = [
            RoomType::GuardedTreasure,
            RoomType::Hazard,
            RoomType::Death,
            RoomType::Enemy,
        ];

        vec![
            first.map(entry).join(gap),
            second.map(entry).join(gap),
        ]
    }

    /// Map rows, two lines per row: rooms with right doors, then down doors.
    ///
    /// Rows without any written room are skipped and columns are cropped to
    /// the written extent.
    pub fn map_lines(&self, floor: &FloorResult) -> Vec<String> {
        let Some((left, right)) = floor.grid.column_bounds() else {
            return Vec::new();
        };
        let margin = " ".repeat(self.margin);

        let mut lines = Vec::new();
        for row in floor.grid.rows() {
            if !row.iter().any(Room::is_written) {
                continue;
            }

            let mut rooms = margin.clone();
            let mut halls = margin.clone();
            for room in &row[left..=right] {
                rooms.push_str(sprite(room.room_type));
                rooms.push_str(if room.right_door { "__" } else { "  " });
                halls.push_str(if room.down_door { " |" } else { "  " });
                halls.push_str("  ");
            }
            lines.push(rooms);
            lines.push(halls);
        }
        lines
    }

    /// One header line per encounter followed by an indented line per enemy.
    pub fn encounter_lines(&self, floor: &FloorResult) -> Vec<String> {
        let mut lines = Vec::new();
        for encounter in &floor.encounters {
            let room_type = floor
                .grid
                .room_type(encounter.position)
                .unwrap_or(RoomType::Enemy);
            lines.push(format!(
                "{} Encounter {} at {}: {}",
                sprite(room_type),
                encounter.id,
                encounter.position,
                encounter.difficulty
            ));
            for enemy in &encounter.enemies {
                lines.push(format!("    {enemy}"));
            }
        }
        lines
    }

    /// Every line of the full document.
    pub fn render_lines(&self, floor: &FloorResult) -> Vec<String> {
        let border = self.border();
        let mut lines = vec![String::new()];
        lines.extend(self.legend());
        lines.push(String::new());

        lines.push(border.clone());
        lines.push(String::new());
        lines.extend(self.map_lines(floor));
        lines.push(border.clone());
        lines.push(String::new());

        lines.push("Encounters:".to_string());
        lines.push(String::new());
        lines.extend(self.encounter_lines(floor));
        lines.push(String::new());
        lines.push(border);
        lines.push(String::new());

        lines
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl FloorRenderer for TextRenderer {
    fn render(&self, floor: &FloorResult) -> String {
        self.render_lines(floor).join("\n")
    }
}
