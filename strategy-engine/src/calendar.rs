/// Fixed-template 30-day plan for `topic`.
///
/// `audience` is part of the signature but the template does not use it yet.
pub fn generate(topic: &str, _audience: &str) -> String {
    format!(
        "30-Day Content Calendar\n\
         Week 1:\n\
         - Day 1: Reel - \"{topic} Hacks\"\n\
         - Day 3: Blog - \"{topic} Routine Review\"\n\
         - Day 5: Short - \"Night Routine in 30s\"\n\
         ... (repeat for 30 days)\n"
    )
}
