pub mod cloudwatch;
pub mod s3;
pub mod slack;
