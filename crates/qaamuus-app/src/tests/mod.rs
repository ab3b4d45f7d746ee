mod support;
mod suggest_tests;
