use labyrinth::{
    a_star_on_known, Action, BayesianConfig, BeliefGrid, Coord, Knowledge, LogicalAgent,
    LogicalConfig, LogicalPercept, PlanState, SearchEngine,
};

/// Applies an action the way the maze driver does.
fn step(pos: Coord, action: Action) -> Coord {
    match action {
        Action::Up => Coord::new(pos.row - 1, pos.col),
        Action::Down => Coord::new(pos.row + 1, pos.col),
        Action::Left => Coord::new(pos.row, pos.col - 1),
        Action::Right => Coord::new(pos.row, pos.col + 1),
        Action::Exit | Action::Grenade | Action::Blowgun => pos,
    }
}

#[test]
fn bfs_picks_first_safe_frontier_cell() {
    let engine = SearchEngine::with_frontier(3, &[Coord::new(0, 1), Coord::new(1, 0)]).unwrap();
    assert_eq!(engine.choose_bfs_move(&[Coord::new(0, 1)]), Some(Coord::new(0, 1)));

    let engine = SearchEngine::with_frontier(3, &[Coord::new(1, 0), Coord::new(0, 1)]).unwrap();
    assert_eq!(engine.choose_bfs_move(&[Coord::new(0, 1)]), Some(Coord::new(0, 1)));
}

#[test]
fn a_star_length_on_rectangle_is_manhattan() {
    let visited: Vec<Coord> = (0..3)
        .flat_map(|r| (0..5).map(move |c| Coord::new(r, c)))
        .collect();
    let start = Coord::new(0, 0);
    let goal = Coord::new(2, 4);
    let path = a_star_on_known(start, goal, &visited, 5).unwrap();
    assert_eq!(path.len(), start.manhattan(goal));
}

#[test]
fn a_star_across_components_is_none() {
    let visited = [Coord::new(0, 0), Coord::new(0, 1), Coord::new(2, 1), Coord::new(2, 2)];
    assert_eq!(a_star_on_known(Coord::new(0, 0), Coord::new(2, 2), &visited, 3), None);
}

#[test]
fn logical_driver_explores_without_dying() {
    // 3x3, one precipice in the far corner; nothing else.
    let pit = Coord::new(2, 2);
    let config = LogicalConfig::with_size(3);
    let mut agent = LogicalAgent::new(config).unwrap();
    let mut engine = SearchEngine::new(config.size).unwrap();

    let mut pos = Coord::origin();
    let mut visited = vec![pos];
    let mut safe: Vec<Coord> = Vec::new();

    for _ in 0..30 {
        let breeze = pos.neighbors(3).any(|n| n == pit);
        let percept = LogicalPercept {
            breeze,
            ..LogicalPercept::default()
        };
        let out = agent
            .process_percept(&percept, pos, &visited, false, false)
            .unwrap();
        for cell in out.safe {
            if !safe.contains(&cell) {
                safe.push(cell);
            }
        }
        assert!(!safe.contains(&pit));

        let Ok(action) = engine.plan_next_move(Knowledge::Safe(&safe), pos, &visited) else {
            break;
        };
        pos = step(pos, action);
        if !visited.contains(&pos) {
            visited.push(pos);
        }
        if visited.len() == 8 {
            break;
        }
    }

    // Every cell but the pit gets proven safe and visited.
    assert_eq!(visited.len(), 8);
    assert!(!visited.contains(&pit));
}

#[test]
fn exit_route_after_goal_found() {
    let mut engine = SearchEngine::new(3).unwrap();
    let visited = [
        Coord::new(0, 0),
        Coord::new(1, 0),
        Coord::new(2, 0),
        Coord::new(2, 1),
    ];
    engine.mark_goal_found();
    engine.set_exit(Coord::new(0, 0)).unwrap();

    let mut pos = Coord::new(2, 1);
    let mut actions = Vec::new();
    loop {
        let action = engine
            .plan_next_move(Knowledge::Safe(&[]), pos, &visited)
            .unwrap();
        assert_eq!(engine.state(), PlanState::HeadingToExit);
        actions.push(action);
        if action == Action::Exit {
            break;
        }
        pos = step(pos, action);
    }
    assert_eq!(pos, Coord::new(0, 0));
    assert_eq!(actions, vec![Action::Left, Action::Up, Action::Up, Action::Exit]);
}

#[test]
fn greedy_driver_steps_onto_frontier() {
    let mut beliefs = BeliefGrid::new(BayesianConfig::with_size(3)).unwrap();
    let mut engine = SearchEngine::new(3).unwrap();
    let start = Coord::origin();

    // Fire sensed at the start: (1,0) and (0,1) each hold half the fire mass.
    beliefs
        .update([true, false, false, false, false], start)
        .unwrap();
    let action = engine
        .plan_next_move(Knowledge::Beliefs(&beliefs), start, &[start])
        .unwrap();
    assert!(matches!(action, Action::Down | Action::Right));
    assert_eq!(engine.frontier(), &[Coord::new(1, 0), Coord::new(0, 1)]);
}
