#[cfg(debug_assertions)]
pub fn get_generation_url() -> &'static str {
    "http://localhost:3000/api/generate/"  // Development URL when running the generation service locally
}

#[cfg(not(debug_assertions))]
pub fn get_generation_url() -> &'static str {
    "https://express-app-ckot.onrender.com/api/generate/"  // Production URL
}
