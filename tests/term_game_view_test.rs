use serde_json::json;
use tui_rogue::term::{GameView, Screen, Viewport, GAME_OVER_PROMPT, HUD_X};
use tui_rogue::types::{Event, GameState, MAP_WIDTH};

fn state() -> GameState {
    let mut map = vec!["FLOOR"; MAP_WIDTH * 20];
    map[0] = "WALL";
    map[MAP_WIDTH * 19 + 79] = "WALL";
    serde_json::from_value(json!({
        "ticks": 42,
        "map": map,
        "actors": [
            {"components": {
                "POSITION": {"x": 5, "y": 3},
                "VISIBLE": {"glyph": 64},
                "HEALTH": {"hp": 7, "max_hp": 10},
                "PLAYER": {}
            }},
            {"components": {
                "POSITION": {"x": 9, "y": 3},
                "VISIBLE": {"glyph": "g"},
                "HEALTH": {"hp": 3, "max_hp": 3}
            }},
            {"components": {"VISIBLE": {"glyph": "?"}}}
        ]
    }))
    .unwrap()
}

fn events(msgs: &[&str]) -> Vec<Event> {
    msgs.iter()
        .map(|m| serde_json::from_value(json!({"msg": m})).unwrap())
        .collect()
}

#[test]
fn draws_walls_and_actor_glyphs() {
    let gs = state();
    let screen = Screen {
        state: Some(&gs),
        ..Screen::default()
    };
    let fb = GameView::new().render(&screen, Viewport::new(120, 24));

    assert_eq!(fb.get(0, 0).unwrap().ch, '#');
    assert_eq!(fb.get(79, 19).unwrap().ch, '#');
    assert_eq!(fb.get(1, 0).unwrap().ch, ' ');

    let player = fb.get(5, 3).unwrap();
    let monster = fb.get(9, 3).unwrap();
    assert_eq!(player.ch, '@');
    assert_eq!(monster.ch, 'g');
    assert_ne!(player.style.fg, monster.style.fg, "player is coloured apart");
    assert!(player.style.bold && monster.style.bold);
}

#[test]
fn hud_lists_ticks_health_and_messages() {
    let gs = state();
    let evs = events(&["You hit the goblin", "", "The goblin dies"]);
    let screen = Screen {
        state: Some(&gs),
        events: &evs,
        ..Screen::default()
    };
    let fb = GameView::new().render(&screen, Viewport::new(130, 24));
    let hud = |y: u16| fb.row_text(y)[HUD_X as usize..].trim_end().to_string();

    assert_eq!(hud(0), "Ticks: 42");
    assert_eq!(hud(2), "@ - Hp: 7/10");
    assert_eq!(hud(3), "g - Hp: 3/3");
    assert_eq!(hud(4), "");
    // Empty messages are skipped.
    assert_eq!(hud(5), "You hit the goblin");
    assert_eq!(hud(6), "The goblin dies");
}

#[test]
fn game_over_prompt_sits_below_the_map() {
    let gs = state();
    let screen = Screen {
        state: Some(&gs),
        game_over: true,
        ..Screen::default()
    };
    let fb = GameView::new().render(&screen, Viewport::new(120, 24));
    assert!(fb.row_text(21).starts_with(GAME_OVER_PROMPT));
    assert!(!fb.text().lines().take(21).any(|l| l.contains(GAME_OVER_PROMPT)));
}

#[test]
fn status_line_shows_server_errors() {
    let gs = state();
    let screen = Screen {
        state: Some(&gs),
        status: Some("[SERVER ERROR] blocked"),
        ..Screen::default()
    };
    let fb = GameView::new().render(&screen, Viewport::new(120, 24));
    assert!(fb.row_text(22).starts_with("[SERVER ERROR] blocked"));
}

#[test]
fn small_terminal_clips_without_panicking() {
    let gs = state();
    let screen = Screen {
        state: Some(&gs),
        game_over: true,
        status: Some("oops"),
        ..Screen::default()
    };
    let fb = GameView::new().render(&screen, Viewport::new(10, 4));
    assert_eq!(fb.width(), 10);
    assert_eq!(fb.get(5, 3).unwrap().ch, '@');
}
