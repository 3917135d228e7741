mod input;
mod lifecycle;
mod streaming;

#[cfg(test)]
mod tests;
