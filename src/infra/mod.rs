pub mod openfec;
