pub mod seaorm;

pub use seaorm::SeaOrmTodoRepository;
