pub mod cotacao;
