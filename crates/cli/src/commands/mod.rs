pub(crate) mod check;
pub(crate) mod history;
pub(crate) mod modules;
pub(crate) mod puzzles;
