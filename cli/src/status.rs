// SPDX-License-Identifier: MIT OR Apache-2.0

//! Status renderer: writes the status line, evaluation line and bar

use gomoku_core::{EvaluationMapper, GameSnapshot, StatusReport};

use crate::view::GameView;

#[derive(Debug, Clone)]
pub struct StatusRenderer {
    mapper: EvaluationMapper,
    /// Report of the last confirmed snapshot
    last: Option<StatusReport>,
}

impl StatusRenderer {
    pub fn new(mapper: EvaluationMapper) -> Self {
        Self { mapper, last: None }
    }

    pub fn mapper(&self) -> &EvaluationMapper {
        &self.mapper
    }

    /// Derive and show the status of a confirmed snapshot
    pub fn render(&mut self, view: &mut GameView, snapshot: &GameSnapshot) {
        let report = StatusReport::from_snapshot(snapshot, &self.mapper);
        apply(view, &report);
        self.last = Some(report);
    }

    /// Show the last confirmed status again, or a neutral bar if there is
    /// none yet. Used after a rollback.
    pub fn resync(&self, view: &mut GameView) {
        match &self.last {
            Some(report) => apply(view, report),
            None => {
                view.evaluation.text.clear();
                view.evaluation.bar = self.mapper.bar_widths(0.0);
            }
        }
    }
}

fn apply(view: &mut GameView, report: &StatusReport) {
    view.status.text = report.status_line.clone();
    view.status.game_over = report.game_over;
    view.evaluation.text = report.evaluation_line.clone().unwrap_or_default();
    view.evaluation.bar = report.bar;
}

#[cfg(test)]
mod tests {
    use super::*;
    use gomoku_core::evaluation::BarWidths;
    use gomoku_core::{Player, Winner};

    #[test]
    fn game_over_resets_evaluation() {
        let mut view = GameView::default();
        let mut renderer = StatusRenderer::new(EvaluationMapper::default());

        let mut snapshot = GameSnapshot::new_game();
        snapshot.ai_score = Some(-4_000.0);
        renderer.render(&mut view, &snapshot);
        assert_eq!(
            view.evaluation.text,
            "Position Evaluation: -4000 (Black (Advantage))"
        );
        assert!(view.evaluation.bar.black > view.evaluation.bar.white);

        snapshot.game_over = true;
        snapshot.winner = Some(Winner::White);
        renderer.render(&mut view, &snapshot);
        assert_eq!(view.status.text, "Game Over - AI won!");
        assert!(view.status.game_over);
        assert!(view.evaluation.text.is_empty());
        assert_eq!(view.evaluation.bar, BarWidths::neutral());
    }

    #[test]
    fn resync_restores_last_confirmed_state() {
        let mut view = GameView::default();
        let mut renderer = StatusRenderer::new(EvaluationMapper::default());
        renderer.resync(&mut view);
        assert_eq!(view.evaluation.bar, BarWidths::neutral());

        let mut snapshot = GameSnapshot::new_game();
        snapshot.current_player = Player::White;
        snapshot.ai_score = Some(300.0);
        renderer.render(&mut view, &snapshot);
        let confirmed = view.clone();

        view.evaluation.bar = BarWidths { white: 1.0, black: 1.0 };
        view.status.text = "stale".to_string();
        renderer.resync(&mut view);
        assert_eq!(view, confirmed);
    }
}
