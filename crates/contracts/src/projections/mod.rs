pub mod p001_returns_analysis;
