use crate::{Cue, Events, Scoreboard, Side};

/// Credit `side` with a point.
///
/// Returns true when play continues and the ball should respawn. Once the
/// match is over no point cue plays; the match mode takes over from there.
pub fn apply_point(side: Side, scoreboard: &mut Scoreboard, events: &mut Events) -> bool {
    events.scored = Some(side);
    scoreboard.register_point(side);
    tracing::debug!(
        left = scoreboard.left,
        right = scoreboard.right,
        "Point for {:?}",
        side
    );

    if scoreboard.is_match_over() {
        false
    } else {
        events.play(Cue::Point);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_continues_play() {
        let mut events = Events::new();
        let mut score = Scoreboard::new(5);

        assert!(apply_point(Side::Right, &mut score, &mut events));

        assert_eq!(score.right, 1);
        assert_eq!(events.scored, Some(Side::Right));
        assert_eq!(events.cues, vec![Cue::Point]);
    }

    #[test]
    fn test_match_point_stops_play() {
        let mut events = Events::new();
        let mut score = Scoreboard::new(1);

        assert!(
            !apply_point(Side::Left, &mut score, &mut events),
            "No respawn after match point"
        );

        assert!(score.is_match_over());
        assert_eq!(events.scored, Some(Side::Left));
        assert!(events.cues.is_empty(), "No point cue once the match is over");
    }

    #[test]
    fn test_multiple_scores_accumulate() {
        let mut events = Events::new();
        let mut score = Scoreboard::new(10);

        apply_point(Side::Left, &mut score, &mut events);
        apply_point(Side::Left, &mut score, &mut events);

        assert_eq!(score.left, 2, "Scores should accumulate");
        assert_eq!(score.right, 0);
        assert_eq!(events.cues, vec![Cue::Point, Cue::Point]);
    }
}
