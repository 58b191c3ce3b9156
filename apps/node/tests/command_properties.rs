//! Property tests for the control state machine.

use std::sync::Arc;

use pong_node::game::SchedulerPolicy;
use pong_node::persistence::Snapshot;
use pong_node::test_support::{test_node, MemoryStore, ScriptedLink};
use pong_node::{Command, GameState, Role};
use proptest::prelude::*;

fn command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        proptest::option::of(0u64..10_000).prop_map(|interval_ms| Command::Start { interval_ms }),
        Just(Command::Pause),
        Just(Command::Resume),
        Just(Command::Stop),
    ]
}

fn state_strategy() -> impl Strategy<Value = GameState> {
    prop_oneof![
        Just(GameState::Stopped),
        Just(GameState::Running),
        Just(GameState::Paused),
    ]
}

/// Reference transition function.
fn expected(before: Snapshot, command: Command) -> Snapshot {
    match (command, before.state) {
        (Command::Start { interval_ms }, _) => Snapshot::new(
            GameState::Running,
            interval_ms.unwrap_or(before.pong_time_ms),
        ),
        (Command::Pause, GameState::Running) => {
            Snapshot::new(GameState::Paused, before.pong_time_ms)
        }
        (Command::Resume, GameState::Paused) => {
            Snapshot::new(GameState::Running, before.pong_time_ms)
        }
        (Command::Stop, _) => Snapshot::new(GameState::Stopped, before.pong_time_ms),
        _ => before,
    }
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime")
}

proptest! {
    #[test]
    fn command_sequences_follow_the_state_machine(
        initial_state in state_strategy(),
        initial_interval in 0u64..10_000,
        commands in proptest::collection::vec(command_strategy(), 1..40),
    ) {
        let rt = runtime();
        rt.block_on(async {
            let initial = Snapshot::new(initial_state, initial_interval);
            let store = Arc::new(MemoryStore::with(initial));
            // Responder: no background pings are spawned by commands.
            let node = test_node(
                Role::Responder,
                store.clone(),
                Arc::new(ScriptedLink::always_ok()),
                SchedulerPolicy::default(),
            );

            let mut model = initial;
            for command in commands {
                model = expected(model, command);
                let (outcome, kickoff) = node.control(command).await.unwrap();
                prop_assert!(kickoff.is_none());
                prop_assert_eq!(outcome.state, model.state);
                prop_assert_eq!(node.status().await.state, model.state);
                prop_assert_eq!(node.status().await.pong_time_ms, model.pong_time_ms);
            }
            // The store holds the last committed transition.
            prop_assert_eq!(store.current(), model);
            Ok(())
        })?;
    }

    #[test]
    fn only_start_leaves_stopped(command in command_strategy(), interval in 0u64..10_000) {
        let rt = runtime();
        rt.block_on(async {
            let store = Arc::new(MemoryStore::with(Snapshot::new(GameState::Stopped, interval)));
            let node = test_node(
                Role::Responder,
                store.clone(),
                Arc::new(ScriptedLink::always_ok()),
                SchedulerPolicy::default(),
            );

            let (outcome, _) = node.control(command).await.unwrap();
            match command {
                Command::Start { interval_ms } => {
                    prop_assert_eq!(outcome.state, GameState::Running);
                    prop_assert_eq!(
                        store.current().pong_time_ms,
                        interval_ms.unwrap_or(interval)
                    );
                }
                _ => {
                    prop_assert_eq!(outcome.state, GameState::Stopped);
                }
            }
            Ok(())
        })?;
    }
}
