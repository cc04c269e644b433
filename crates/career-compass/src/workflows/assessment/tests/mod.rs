mod common;

mod orchestrator;
