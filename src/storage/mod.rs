pub mod fractal_document;
