//! Rendering a generated floor to text and HTML.

use dungen::{sprite, FloorRenderer, HtmlRenderer, RoomType, TextRenderer};

#[test]
fn test_rendered_map_covers_every_written_row() {
    let floor = dungen::generate_seeded(30, 1234).unwrap();
    let renderer = TextRenderer::new();
    let lines = renderer.map_lines(&floor);

    let written_rows = floor
        .grid
        .rows()
        .filter(|row| row.iter().any(|room| room.is_written()))
        .count();
    assert_eq!(lines.len(), written_rows * 2);

    let (left, right) = floor.grid.column_bounds().unwrap();
    let width = 16 + (right - left + 1) * 4;
    assert!(lines.iter().all(|line| line.chars().count() == width));

    let map = lines.join("\n");
    assert_eq!(map.matches(sprite(RoomType::Start)).count(), 1);
}

#[test]
fn test_every_encounter_is_listed() {
    let floor = dungen::generate_seeded(30, 99).unwrap();
    let text = TextRenderer::new().render(&floor);

    for encounter in &floor.encounters {
        let header = format!("Encounter {} at {}: {}", encounter.id, encounter.position, encounter.difficulty);
        assert!(text.contains(&header), "missing {header}");
        for enemy in &encounter.enemies {
            assert!(text.contains(&format!("    {enemy}")));
        }
    }
}

#[test]
fn test_html_wraps_the_text_document() {
    let floor = dungen::generate_seeded(30, 7).unwrap();
    let text_lines = TextRenderer::new().render_lines(&floor);
    let html = HtmlRenderer::new().render(&floor);

    assert_eq!(html.matches("<pre>").count(), text_lines.len());
    assert!(html.contains("Entrance"));
    assert!(!html.contains("<3 Safe"));
}
