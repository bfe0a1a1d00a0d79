use std::io::{BufRead, Write};

use turnsweep_core::*;

use crate::{ProtocolError, Result};
use crate::codec::*;

/// Plays the authority side: one action line in, one rendering out, until the game ends.
///
/// The summary is written once the game is won or lost, or when the input runs out.
pub fn run_authority<R: BufRead, W: Write>(
    board: &mut Board,
    input: &mut LineReader<R>,
    output: &mut W,
) -> Result<Summary> {
    while board.state().is_playing() {
        let Some(line) = input.next_line()? else {
            log::debug!("input closed while still playing");
            break;
        };
        if let Some(action) = ActionLine::parse(&line)?.to_action() {
            board.apply(action);
        }
        write_rendering(output, &board.render())?;
        output.flush()?;
    }

    let summary = board.summary();
    write_summary(output, &summary)?;
    Ok(summary)
}

/// Plays the agent side against an authority on the other end of `input`/`output`.
pub fn run_agent<R: BufRead, W: Write, S: RandomSource + ?Sized>(
    agent: &mut Agent,
    opening: Coord2,
    input: &mut LineReader<R>,
    output: &mut W,
    rng: &mut S,
) -> Result<Summary> {
    let size = agent.view().size();
    write_action(output, agent.start(opening))?;

    loop {
        let line = input.expect_line()?;
        if summary_headline_state(&line).is_some() {
            return read_summary(input, &line);
        }

        let rendering = read_rendering_after(input, line, size)?;
        if rendering.implied_state().is_finished() {
            let headline = input.expect_line()?;
            return read_summary(input, &headline);
        }

        agent.observe(&rendering)?;
        let action = agent.decide(rng).ok_or(ProtocolError::Stalled)?;
        write_action(output, action)?;
    }
}

/// Runs both roles in one process, passing every action and rendering through its text form.
///
/// `observer` sees what the authority prints: each rendering, then the summary.
pub fn self_play<W: Write, S: RandomSource + ?Sized>(
    layout: &MineLayout,
    opening: Coord2,
    rng: &mut S,
    observer: &mut W,
) -> Result<Summary> {
    let size = layout.size();
    let mut board = Board::new(layout);
    let mut agent = Agent::new(size)?;
    let mut action = agent.start(opening);
    let mut turns = 0usize;

    loop {
        turns += 1;
        let line = ActionLine::from(action).to_string();
        if let Some(action) = ActionLine::parse(&line)?.to_action() {
            board.apply(action);
        }

        let text = format_rendering(&board.render());
        observer.write_all(text.as_bytes())?;
        if board.state().is_finished() {
            break;
        }

        let rendering = read_rendering(&mut LineReader::new(text.as_bytes()), size)?;
        agent.observe(&rendering)?;
        action = agent.decide(rng).ok_or(ProtocolError::Stalled)?;
    }

    let summary = board.summary();
    log::debug!("game over after {} turns: {:?}", turns, summary);
    write_summary(observer, &summary)?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    /// Always takes the first candidate.
    struct First;

    impl RandomSource for First {
        fn pick_index(&mut self, _len: usize) -> usize {
            0
        }
    }

    fn sample_layout() -> MineLayout {
        read_layout(&mut LineReader::new("3 3\n.X.\n...\n..X\n".as_bytes())).unwrap()
    }

    fn authority(layout: &MineLayout, actions: &str) -> (Summary, String) {
        let mut board = Board::new(layout);
        let mut output = Vec::new();
        let summary =
            run_authority(&mut board, &mut LineReader::new(actions.as_bytes()), &mut output)
                .unwrap();
        (summary, String::from_utf8(output).unwrap())
    }

    #[test]
    fn authority_plays_winning_scenario() {
        let (summary, output) = authority(&sample_layout(), "0 0 0\n0 2 0\n2 0 0\n1 2 0\n");

        assert_eq!(
            output,
            "1??\n???\n???\n\
             1?1\n???\n???\n\
             1?1\n12?\n01?\n\
             1@1\n122\n01@\n\
             YOU WIN!\n7 2\n"
        );
        assert_eq!(summary.state, GameState::Won);
    }

    #[test]
    fn authority_plays_losing_scenario() {
        let (summary, output) = authority(&sample_layout(), "0 0 0\n0 1 0\n2 0 0\n");

        assert_eq!(output, "1??\n???\n???\n1X?\n???\n???\nGAME OVER!\n1 0\n");
        assert_eq!(summary.state, GameState::Lost);
    }

    #[test]
    fn authority_ignores_out_of_range_actions() {
        let (_, output) = authority(&sample_layout(), "-1 0 0\n0 7 1\n");

        assert_eq!(output, "???\n???\n???\n???\n???\n???\nGAME OVER!\n0 0\n");
    }

    #[test]
    fn authority_rejects_unknown_action_kind() {
        let mut board = Board::new(&sample_layout());
        let mut output = Vec::new();

        let result = run_authority(
            &mut board,
            &mut LineReader::new("0 0 5\n".as_bytes()),
            &mut output,
        );

        assert!(matches!(result, Err(ProtocolError::InvalidActionKind(5))));
    }

    #[test]
    fn agent_answers_each_rendering_with_one_action() {
        // 2x2 board with its mine at (1, 1)
        let transcript = "1?\n??\n11\n??\n11\n1@\nYOU WIN!\n3 1\n";
        let mut agent = Agent::new((2, 2)).unwrap();
        let mut output = Vec::new();

        let summary = run_agent(
            &mut agent,
            (0, 0),
            &mut LineReader::new(transcript.as_bytes()),
            &mut output,
            &mut First,
        )
        .unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "0 0 0\n0 1 0\n1 0 0\n");
        assert_eq!(
            summary,
            Summary {
                state: GameState::Won,
                visited: 3,
                marked: 1,
            }
        );
    }

    #[test]
    fn agent_stops_on_lost_rendering() {
        let transcript = "X?\n??\nGAME OVER!\n0 0\n";
        let mut agent = Agent::new((2, 2)).unwrap();
        let mut output = Vec::new();

        let summary = run_agent(
            &mut agent,
            (1, 1),
            &mut LineReader::new(transcript.as_bytes()),
            &mut output,
            &mut First,
        )
        .unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "1 1 0\n");
        assert_eq!(summary.state, GameState::Lost);
    }

    #[test]
    fn agent_reports_truncated_input() {
        let mut agent = Agent::new((2, 2)).unwrap();
        let mut output = Vec::new();

        let result = run_agent(
            &mut agent,
            (0, 0),
            &mut LineReader::new("1?\n".as_bytes()),
            &mut output,
            &mut First,
        );

        assert!(matches!(result, Err(ProtocolError::UnexpectedEof)));
    }

    #[test]
    fn self_play_wins_sample_board() {
        let mut observer = Vec::new();

        let summary = self_play(&sample_layout(), (2, 0), &mut First, &mut observer).unwrap();

        let output = String::from_utf8(observer).unwrap();
        assert!(output.starts_with("???\n12?\n01?\n"));
        assert!(output.ends_with("1@1\n122\n01@\nYOU WIN!\n7 2\n"));
        assert_eq!(summary.state, GameState::Won);
    }

    #[test]
    fn self_play_prints_whole_renderings() {
        let layout = RandomLayoutGenerator::new(5, (4, 4), StartCell::AlwaysZero)
            .generate(GameConfig::new((10, 10), 15));
        let mut observer = Vec::new();

        let summary = self_play(
            &layout,
            (4, 4),
            &mut SmallRng::seed_from_u64(5),
            &mut observer,
        )
        .unwrap();

        let output = String::from_utf8(observer).unwrap();
        let renderings = output.lines().count() - 2;
        assert_eq!(renderings % 10, 0);
        assert!(summary.state.is_finished());
        assert!(output.ends_with(&format!("{} {}\n", summary.visited, summary.marked)));
    }
}
