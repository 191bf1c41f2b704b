mod common;
mod facts;
mod grading;
