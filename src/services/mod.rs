pub mod questions_service;
