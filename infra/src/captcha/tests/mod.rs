//! Unit tests for captcha rendering
