mod browser_flow_tests;
mod game_flow_tests;
