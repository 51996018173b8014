pub mod canvas_board;
pub mod force_graph;
