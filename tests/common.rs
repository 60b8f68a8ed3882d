use std::path::Path;

use anyhow::{Context, Result};
use bloxorz::{Game, Problem};
use console::style;

type IndexMap<K, V> = indexmap::IndexMap<K, V, fxhash::FxBuildHasher>;

pub const SEPARATOR: &str = "================\n";
pub const TEST_DIR: &str = "tests";
pub const EXTENTION: &str = "map";

pub fn parse_game(map: &str) -> Result<Game> {
    map.parse::<Game>().context("Invalid map")
}

/// Shortest action sequence from the initial state to a goal state.
#[allow(unused)]
pub fn bfs<P: Problem>(problem: &P) -> Option<Vec<P::Action>> {
    let initial = problem.initial();
    if problem.is_goal(&initial) {
        return Some(Vec::new());
    }

    let mut state_parent = IndexMap::default();
    state_parent.insert(initial, None); // Sentinel.
    let mut cursor = 0;
    let goal_idx = 'bfs: loop {
        let (state, _) = state_parent.get_index(cursor)?;
        let state = state.clone();
        for action in problem.actions(&state) {
            let next = problem.result(&state, &action);
            if state_parent.contains_key(&next) {
                continue;
            }
            let is_goal = problem.is_goal(&next);
            let (idx, _) = state_parent.insert_full(next, Some((cursor, action)));
            if is_goal {
                break 'bfs idx;
            }
        }
        cursor += 1;
    };

    let mut steps = std::iter::successors(state_parent[goal_idx], |&(parent, _)| {
        state_parent[parent]
    })
    .map(|(_, action)| action)
    .collect::<Vec<_>>();
    steps.reverse();
    Some(steps)
}

pub fn run_tests(subdir: &str, mut f: impl FnMut(&str) -> Result<String>) {
    let mut tests = std::fs::read_dir(Path::new(TEST_DIR).join(subdir))
        .unwrap()
        .filter_map(|ent| {
            let path = ent.unwrap().path();
            if path.extension().map_or(true, |ext| ext != EXTENTION) {
                return None;
            }
            let name = path.file_stem().unwrap().to_str().unwrap().to_owned();
            Some((name, path))
        })
        .collect::<Vec<_>>();
    tests.sort();

    let do_update_tests = std::env::var("UPDATE_EXPECT").map_or(false, |v| v == "1");

    let mut failed_cnt = 0;
    for (name, path) in &tests {
        eprint!("{name}: ");
        let content = std::fs::read_to_string(path).unwrap();
        match f(&content) {
            Ok(got) if got == content => eprintln!("{}", style("OK").green()),
            Ok(got) if do_update_tests => {
                std::fs::write(path, got).unwrap();
                eprintln!("{}", style("Updated").yellow());
            }
            Ok(got) => {
                eprintln!("{}\n{got}", style("FAILED").red());
                failed_cnt += 1;
            }
            Err(err) => {
                eprintln!("{}\n{:?}", style("FAILED").red(), err);
                failed_cnt += 1;
            }
        }
    }

    if failed_cnt != 0 {
        eprintln!("{failed_cnt}/{} tests failed", tests.len());
        std::process::exit(1);
    }
}
