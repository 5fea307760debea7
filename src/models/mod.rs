// Data models for camera capture and pose estimation

pub mod camera;
pub mod pose;
