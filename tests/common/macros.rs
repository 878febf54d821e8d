/// Asserts that the agent with the given id is still alive in the universe.
#[macro_export]
macro_rules! assert_agent_alive {
    ($universe:expr, $id:expr) => {
        let alive = $universe.agents().iter().any(|a| a.id() == $id);
        assert!(alive, "Agent {} should be alive but was not found", $id);
    };
}

/// Asserts that the agent with the given id has been swept from the universe.
#[macro_export]
macro_rules! assert_agent_dead {
    ($universe:expr, $id:expr) => {
        let exists = $universe.agents().iter().any(|a| a.id() == $id);
        assert!(!exists, "Agent {} should be dead but was found alive", $id);
    };
}

/// Asserts that the live population matches the expected value.
#[macro_export]
macro_rules! assert_population {
    ($universe:expr, $count:expr) => {
        assert_eq!($universe.population(), $count, "Population count mismatch");
    };
}
