use macroquad::prelude::*;
use life_sculpture::{
    Session, SessionConfig, presets,
    application::PatternSource,
    domain::all_rules,
    rendering::sculpture,
};

fn window_conf() -> Conf {
    Conf {
        window_title: "Life Sculpture".to_owned(),
        window_width: 1200,
        window_height: 900,
        window_resizable: true,
        ..Default::default()
    }
}

/// Keyboard controls, one action per key press
fn handle_keys(session: &mut Session, rule_index: &mut usize, pattern_index: &mut usize) {
    let len = session.engine.history().len();
    let step = if is_key_down(KeyCode::LeftShift) { 50 } else { 5 };

    if is_key_pressed(KeyCode::Right) {
        session.slide_window(step);
    }
    if is_key_pressed(KeyCode::Left) {
        session.slide_window(-step);
    }
    if is_key_pressed(KeyCode::Up) {
        let window = session.window;
        let end = (window.end + step).min(len as i64 - 1);
        session.set_window(window.start, end);
    }
    if is_key_pressed(KeyCode::Down) {
        let window = session.window;
        session.set_window(window.start, (window.end - step).max(window.start));
    }
    if is_key_pressed(KeyCode::A) {
        session.show_all();
    }

    let result = if is_key_pressed(KeyCode::R) {
        let rules = all_rules();
        *rule_index = (*rule_index + 1) % rules.len();
        let (name, rule) = rules[*rule_index];
        log::info!("switching to {} ({})", name, rule);
        session.set_rule(rule)
    } else if is_key_pressed(KeyCode::P) {
        let patterns = presets::all_patterns();
        *pattern_index = (*pattern_index + 1) % patterns.len();
        let pattern = &patterns[*pattern_index];
        log::info!("switching to {} ({})", pattern.name, pattern.description);
        session.set_pattern(PatternSource::Preset(pattern.name.to_string()))
    } else if is_key_pressed(KeyCode::T) {
        let toroidal = !session.config.toroidal;
        session.set_toroidal(toroidal)
    } else {
        Ok(())
    };

    if let Err(e) = result {
        log::error!("could not restart session: {}", e);
    }
}

fn draw_hud(session: &Session, instance_count: usize) {
    let config = &session.config;
    let window = session.window;
    let lines = [
        format!(
            "Grid {}x{} {}  Rule {}",
            config.grid_size,
            config.grid_size,
            if config.toroidal { "torus" } else { "bounded" },
            config.rule
        ),
        format!(
            "Algorithm {}: {}",
            config.algorithm.name(),
            config.algorithm.description()
        ),
        format!(
            "Generations {}..={} of {}{}",
            window.start,
            window.end,
            session.engine.history().len(),
            if session.is_computing() { "  (computing...)" } else { "" }
        ),
        format!(
            "Instances {}  dropped {}",
            instance_count,
            session.cache.dropped()
        ),
        format!(
            "Compute {:.1}ms  Sync {:.2}ms  FPS {}",
            session.last_compute_time_ms,
            session.last_sync_time_ms,
            get_fps()
        ),
        "Left/Right slide  Up/Down span  A all  R rule  P pattern  T torus".to_string(),
    ];
    for (i, line) in lines.iter().enumerate() {
        draw_text(line, 12.0, 24.0 + i as f32 * 22.0, 20.0, WHITE);
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let config = SessionConfig::default();
    let mut session = match Session::from_config(config) {
        Ok(session) => session,
        Err(e) => {
            log::error!("invalid session config: {}", e);
            return;
        }
    };

    let mut rule_index = 0;
    let mut pattern_index = presets::all_patterns()
        .iter()
        .position(|p| PatternSource::Preset(p.name.to_string()) == session.config.pattern)
        .unwrap_or(0);

    loop {
        handle_keys(&mut session, &mut rule_index, &mut pattern_index);

        session.poll();
        session.sync();

        // Immediate-mode drawing re-reads the records every frame
        let published = session.cache.publish(|_| {});

        clear_background(Color::new(0.05, 0.05, 0.08, 1.0));
        set_camera(&sculpture::sculpture_camera(
            session.config.grid_size,
            published.min_y,
            published.max_y,
        ));
        sculpture::draw_instances(session.cache.records(), published.min_y, published.max_y);

        set_default_camera();
        draw_hud(&session, published.instance_count);

        next_frame().await;
    }
}
