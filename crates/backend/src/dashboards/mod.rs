pub mod d001_returns_dashboard;
