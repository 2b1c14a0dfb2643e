//! HUD Overlay
//!
//! Builds the per-frame 2D overlay mesh: balloon sprites, score panels with
//! bump/leader feedback, the countdown, dialogue box, transient banner, and
//! the level summary modals. Modal buttons are recorded as hit-rects each
//! frame; the shell routes clicks through [`Hud::hit_test`] and calls the
//! game directly, so no global instance is ever needed.

use crate::game::balloons::{BalloonGame, LevelPhase, Side, leader};
use crate::game::dialogue::DialogueSystem;
use crate::game::levels::LEVEL_COUNT;
use crate::game::types::Mesh;

use super::text::{add_disc, add_rect, draw_text, text_width};

const TEXT_SCALE: f32 = 2.0;
const TITLE_SCALE: f32 = 3.0;

const PANEL_BG: [f32; 4] = [0.08, 0.08, 0.12, 0.78];
const MODAL_BG: [f32; 4] = [0.06, 0.06, 0.1, 0.92];
const BUTTON_BG: [f32; 4] = [0.16, 0.35, 0.16, 1.0];
const LEADER_GOLD: [f32; 4] = [1.0, 0.85, 0.3, 1.0];
const PLAIN_TEXT: [f32; 4] = [0.92, 0.92, 0.92, 1.0];

/// Balloon palette; a balloon's hue picks one entry.
const BALLOON_COLORS: [[f32; 4]; 6] = [
    [0.89, 0.22, 0.25, 1.0],
    [0.95, 0.6, 0.15, 1.0],
    [0.95, 0.85, 0.2, 1.0],
    [0.3, 0.75, 0.35, 1.0],
    [0.25, 0.5, 0.9, 1.0],
    [0.65, 0.35, 0.8, 1.0],
];

/// Action behind a summary-modal button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudAction {
    NextLevel,
    Restart,
}

#[derive(Debug, Clone, Copy)]
struct ButtonRect {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    action: HudAction,
}

impl ButtonRect {
    fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.w && py >= self.y && py <= self.y + self.h
    }
}

/// Overlay builder. Owns nothing but the viewport size and the hit-rects
/// recorded by the last [`build`](Hud::build).
pub struct Hud {
    width: f32,
    height: f32,
    buttons: Vec<ButtonRect>,
}

impl Hud {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            buttons: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Hit-test a click against the modal buttons from the last build.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<HudAction> {
        self.buttons
            .iter()
            .find(|b| b.contains(x, y))
            .map(|b| b.action)
    }

    /// Compose the full overlay mesh for this frame.
    pub fn build(&mut self, game: &BalloonGame, dialogue: &DialogueSystem) -> Mesh {
        let mut mesh = Mesh::new();
        self.buttons.clear();

        match game.phase() {
            LevelPhase::Idle => self.draw_idle_hint(&mut mesh),
            LevelPhase::Spawning | LevelPhase::Active => {
                self.draw_balloons(&mut mesh, game);
                self.draw_opposing_guard(&mut mesh, game);
                self.draw_score_panels(&mut mesh, game);
            }
            LevelPhase::Complete => {
                self.draw_score_panels(&mut mesh, game);
                self.draw_complete_modal(&mut mesh, game);
            }
            LevelPhase::Failed => {
                self.draw_score_panels(&mut mesh, game);
                self.draw_failed_modal(&mut mesh, game);
            }
        }

        self.draw_transient(&mut mesh, dialogue);
        self.draw_dialogue_box(&mut mesh, dialogue);

        mesh
    }

    // -- Pieces --------------------------------------------------------------

    fn draw_idle_hint(&self, mesh: &mut Mesh) {
        let text = "PRESS B FOR THE BALLOON GAME";
        let w = text_width(text, TEXT_SCALE);
        draw_text(
            &mut mesh.vertices,
            &mut mesh.indices,
            text,
            self.width - w - 16.0,
            self.height - 28.0,
            TEXT_SCALE,
            [1.0, 1.0, 1.0, 0.55],
            self.width,
            self.height,
        );
    }

    fn draw_balloons(&self, mesh: &mut Mesh, game: &BalloonGame) {
        for balloon in game.balloons() {
            let color_idx =
                ((balloon.hue * BALLOON_COLORS.len() as f32) as usize).min(BALLOON_COLORS.len() - 1);
            let color = BALLOON_COLORS[color_idx];

            add_disc(
                &mut mesh.vertices,
                &mut mesh.indices,
                balloon.pos.x,
                balloon.pos.y,
                balloon.radius,
                color,
                20,
                self.width,
                self.height,
            );
            // Knot and string below the body
            add_rect(
                &mut mesh.vertices,
                &mut mesh.indices,
                balloon.pos.x - 2.0,
                balloon.pos.y + balloon.radius,
                4.0,
                4.0,
                [color[0] * 0.6, color[1] * 0.6, color[2] * 0.6, 1.0],
                self.width,
                self.height,
            );
            add_rect(
                &mut mesh.vertices,
                &mut mesh.indices,
                balloon.pos.x - 0.75,
                balloon.pos.y + balloon.radius + 4.0,
                1.5,
                balloon.radius * 0.6,
                [0.85, 0.85, 0.85, 0.8],
                self.width,
                self.height,
            );
        }
    }

    fn draw_opposing_guard(&self, mesh: &mut Mesh, game: &BalloonGame) {
        let guard = game.guard();
        let body = if guard.is_traveling() {
            [0.8, 0.25, 0.2, 1.0]
        } else {
            [0.45, 0.45, 0.5, 1.0]
        };
        add_rect(
            &mut mesh.vertices,
            &mut mesh.indices,
            guard.pos.x - 8.0,
            guard.pos.y - 10.0,
            16.0,
            20.0,
            body,
            self.width,
            self.height,
        );
        add_disc(
            &mut mesh.vertices,
            &mut mesh.indices,
            guard.pos.x,
            guard.pos.y - 16.0,
            7.0,
            [0.9, 0.75, 0.6, 1.0],
            12,
            self.width,
            self.height,
        );
    }

    fn draw_score_panels(&self, mesh: &mut Mesh, game: &BalloonGame) {
        let lead = leader(game.player_score(), game.guard_score());

        // Player panel, top-left
        let player_scale = TEXT_SCALE * game.fx().scale(Side::Player);
        let player_color = if lead == Some(Side::Player) {
            LEADER_GOLD
        } else {
            PLAIN_TEXT
        };
        add_rect(
            &mut mesh.vertices,
            &mut mesh.indices,
            12.0,
            12.0,
            190.0,
            34.0,
            PANEL_BG,
            self.width,
            self.height,
        );
        draw_text(
            &mut mesh.vertices,
            &mut mesh.indices,
            &format!("YOU: {}", game.player_score()),
            20.0,
            20.0,
            player_scale,
            player_color,
            self.width,
            self.height,
        );

        // Guard panel, top-right
        let guard_scale = TEXT_SCALE * game.fx().scale(Side::Guard);
        let guard_color = if lead == Some(Side::Guard) {
            LEADER_GOLD
        } else {
            PLAIN_TEXT
        };
        add_rect(
            &mut mesh.vertices,
            &mut mesh.indices,
            self.width - 202.0,
            12.0,
            190.0,
            34.0,
            PANEL_BG,
            self.width,
            self.height,
        );
        draw_text(
            &mut mesh.vertices,
            &mut mesh.indices,
            &format!("GUARD: {}", game.guard_score()),
            self.width - 194.0,
            20.0,
            guard_scale,
            guard_color,
            self.width,
            self.height,
        );

        // Level, remaining balloons and countdown, top-center
        let status = format!(
            "LEVEL {}  BALLOONS {}  TIME {}",
            game.level(),
            game.balloons_left(),
            game.time_left()
        );
        let w = text_width(&status, TEXT_SCALE);
        add_rect(
            &mut mesh.vertices,
            &mut mesh.indices,
            (self.width - w) / 2.0 - 10.0,
            12.0,
            w + 20.0,
            34.0,
            PANEL_BG,
            self.width,
            self.height,
        );
        let time_color = if game.time_left() <= 5 && game.is_running() {
            [1.0, 0.35, 0.3, 1.0]
        } else {
            PLAIN_TEXT
        };
        draw_text(
            &mut mesh.vertices,
            &mut mesh.indices,
            &status,
            (self.width - w) / 2.0,
            20.0,
            TEXT_SCALE,
            time_color,
            self.width,
            self.height,
        );
    }

    fn modal_frame(&self, mesh: &mut Mesh) -> (f32, f32, f32, f32) {
        let w = 420.0_f32.min(self.width - 40.0);
        let h = 230.0;
        let x = (self.width - w) / 2.0;
        let y = (self.height - h) / 2.0;
        add_rect(
            &mut mesh.vertices,
            &mut mesh.indices,
            x,
            y,
            w,
            h,
            MODAL_BG,
            self.width,
            self.height,
        );
        (x, y, w, h)
    }

    fn modal_button(&mut self, mesh: &mut Mesh, label: &str, y: f32, action: HudAction) {
        let w = text_width(label, TEXT_SCALE) + 32.0;
        let h = 40.0;
        let x = (self.width - w) / 2.0;
        add_rect(
            &mut mesh.vertices,
            &mut mesh.indices,
            x,
            y,
            w,
            h,
            BUTTON_BG,
            self.width,
            self.height,
        );
        draw_text(
            &mut mesh.vertices,
            &mut mesh.indices,
            label,
            x + 16.0,
            y + 13.0,
            TEXT_SCALE,
            PLAIN_TEXT,
            self.width,
            self.height,
        );
        self.buttons.push(ButtonRect { x, y, w, h, action });
    }

    fn draw_summary_scores(&self, mesh: &mut Mesh, game: &BalloonGame, y: f32) {
        let lines = [
            format!("YOU: {}", game.player_score()),
            format!("GUARD: {}", game.guard_score()),
        ];
        for (i, line) in lines.iter().enumerate() {
            let w = text_width(line, TEXT_SCALE);
            draw_text(
                &mut mesh.vertices,
                &mut mesh.indices,
                line,
                (self.width - w) / 2.0,
                y + i as f32 * 26.0,
                TEXT_SCALE,
                PLAIN_TEXT,
                self.width,
                self.height,
            );
        }

        let verdict = match leader(game.player_score(), game.guard_score()) {
            Some(Side::Player) => "YOU LEAD THE FAIR!",
            Some(Side::Guard) => "THE GUARD LEADS!",
            None => "ALL SQUARE!",
        };
        let w = text_width(verdict, TEXT_SCALE);
        draw_text(
            &mut mesh.vertices,
            &mut mesh.indices,
            verdict,
            (self.width - w) / 2.0,
            y + 56.0,
            TEXT_SCALE,
            LEADER_GOLD,
            self.width,
            self.height,
        );
    }

    fn draw_complete_modal(&mut self, mesh: &mut Mesh, game: &BalloonGame) {
        let (_, y, _, _) = self.modal_frame(mesh);

        let title = format!("LEVEL {} CLEAR!", game.level());
        let w = text_width(&title, TITLE_SCALE);
        draw_text(
            &mut mesh.vertices,
            &mut mesh.indices,
            &title,
            (self.width - w) / 2.0,
            y + 22.0,
            TITLE_SCALE,
            LEADER_GOLD,
            self.width,
            self.height,
        );
        self.draw_summary_scores(mesh, game, y + 64.0);

        if game.level() < LEVEL_COUNT {
            self.modal_button(mesh, "NEXT LEVEL", y + 164.0, HudAction::NextLevel);
        } else {
            self.modal_button(mesh, "PLAY AGAIN", y + 164.0, HudAction::Restart);
        }
    }

    fn draw_failed_modal(&mut self, mesh: &mut Mesh, game: &BalloonGame) {
        let (_, y, _, _) = self.modal_frame(mesh);

        let title = "TIME'S UP!";
        let w = text_width(title, TITLE_SCALE);
        draw_text(
            &mut mesh.vertices,
            &mut mesh.indices,
            title,
            (self.width - w) / 2.0,
            y + 22.0,
            TITLE_SCALE,
            [1.0, 0.4, 0.35, 1.0],
            self.width,
            self.height,
        );
        self.draw_summary_scores(mesh, game, y + 64.0);
        self.modal_button(mesh, "RESTART", y + 164.0, HudAction::Restart);
    }

    fn draw_transient(&self, mesh: &mut Mesh, dialogue: &DialogueSystem) {
        let Some(text) = dialogue.transient() else {
            return;
        };
        let w = text_width(text, TEXT_SCALE);
        add_rect(
            &mut mesh.vertices,
            &mut mesh.indices,
            (self.width - w) / 2.0 - 12.0,
            58.0,
            w + 24.0,
            30.0,
            PANEL_BG,
            self.width,
            self.height,
        );
        draw_text(
            &mut mesh.vertices,
            &mut mesh.indices,
            text,
            (self.width - w) / 2.0,
            66.0,
            TEXT_SCALE,
            PLAIN_TEXT,
            self.width,
            self.height,
        );
    }

    fn draw_dialogue_box(&self, mesh: &mut Mesh, dialogue: &DialogueSystem) {
        let Some(session) = dialogue.session() else {
            return;
        };

        let box_h = 110.0;
        let y = self.height - box_h - 16.0;
        add_rect(
            &mut mesh.vertices,
            &mut mesh.indices,
            16.0,
            y,
            self.width - 32.0,
            box_h,
            MODAL_BG,
            self.width,
            self.height,
        );
        draw_text(
            &mut mesh.vertices,
            &mut mesh.indices,
            session.speaker(),
            32.0,
            y + 14.0,
            TEXT_SCALE,
            LEADER_GOLD,
            self.width,
            self.height,
        );
        draw_text(
            &mut mesh.vertices,
            &mut mesh.indices,
            session.revealed_text(),
            32.0,
            y + 46.0,
            TEXT_SCALE,
            PLAIN_TEXT,
            self.width,
            self.height,
        );

        let hint = if session.line_index() + 1 < session.line_count() {
            "CLICK TO CONTINUE"
        } else {
            "CLICK TO CLOSE"
        };
        draw_text(
            &mut mesh.vertices,
            &mut mesh.indices,
            hint,
            32.0,
            y + box_h - 24.0,
            TEXT_SCALE * 0.75,
            [1.0, 1.0, 1.0, 0.5],
            self.width,
            self.height,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::balloons::SPAWN_STAGGER;
    use crate::game::levels::level_spec;

    fn completed_game(level: u32) -> BalloonGame {
        let mut game = BalloonGame::new(1280.0, 720.0);
        game.start_level(level);
        let count = level_spec(level).balloon_count;
        game.update(SPAWN_STAGGER * count as f32 + 0.01);
        while game.balloons_left() > 0 {
            let pos = game.balloons()[0].pos;
            game.click(pos.x, pos.y);
        }
        assert_eq!(game.phase(), LevelPhase::Complete);
        game
    }

    #[test]
    fn test_running_game_draws_balloons() {
        let mut hud = Hud::new(1280.0, 720.0);
        let mut game = BalloonGame::new(1280.0, 720.0);
        game.start_level(1);
        game.update(SPAWN_STAGGER * 6.0 + 0.01);

        let mesh = hud.build(&game, &DialogueSystem::new());
        assert!(!mesh.is_empty());
        assert!(hud.hit_test(640.0, 360.0).is_none());
    }

    #[test]
    fn test_complete_modal_offers_next_level() {
        let mut hud = Hud::new(1280.0, 720.0);
        let game = completed_game(1);
        hud.build(&game, &DialogueSystem::new());

        // The single button sits horizontally centered in the modal
        let action = hud.hit_test(640.0, (720.0 - 230.0) / 2.0 + 184.0);
        assert_eq!(action, Some(HudAction::NextLevel));
    }

    #[test]
    fn test_final_level_offers_restart() {
        let mut hud = Hud::new(1280.0, 720.0);
        let game = completed_game(10);
        hud.build(&game, &DialogueSystem::new());

        let action = hud.hit_test(640.0, (720.0 - 230.0) / 2.0 + 184.0);
        assert_eq!(action, Some(HudAction::Restart));
    }

    #[test]
    fn test_failed_modal_offers_restart() {
        let mut hud = Hud::new(1280.0, 720.0);
        let mut game = BalloonGame::new(1280.0, 720.0);
        game.start_level(10);
        for _ in 0..16 {
            game.update(1.0);
        }
        assert_eq!(game.phase(), LevelPhase::Failed);

        hud.build(&game, &DialogueSystem::new());
        let action = hud.hit_test(640.0, (720.0 - 230.0) / 2.0 + 184.0);
        assert_eq!(action, Some(HudAction::Restart));
    }

    #[test]
    fn test_buttons_cleared_between_builds() {
        let mut hud = Hud::new(1280.0, 720.0);
        let game = completed_game(1);
        hud.build(&game, &DialogueSystem::new());
        assert!(hud.hit_test(640.0, (720.0 - 230.0) / 2.0 + 184.0).is_some());

        let idle = BalloonGame::new(1280.0, 720.0);
        hud.build(&idle, &DialogueSystem::new());
        assert!(hud.hit_test(640.0, (720.0 - 230.0) / 2.0 + 184.0).is_none());
    }

    #[test]
    fn test_dialogue_box_drawn_when_session_open() {
        let mut hud = Hud::new(1280.0, 720.0);
        let game = BalloonGame::new(1280.0, 720.0);
        let mut dialogue = DialogueSystem::new();
        dialogue.open("King");
        dialogue.update(10.0);

        let mesh = hud.build(&game, &dialogue);
        assert!(!mesh.is_empty());
    }
}
