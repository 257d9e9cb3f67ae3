mod fixture;
mod pipeline_test;
