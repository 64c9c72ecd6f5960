#![no_main]

use libfuzzer_sys::fuzz_target;
use stamp::{InputKey, InputSet, Template};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let template = Template::parse(text);

    // Without inputs the text must come back unchanged
    let untouched = template.substitute(&InputSet::new());
    assert_eq!(untouched.content, text);

    let inputs = InputKey::ALL
        .into_iter()
        .fold(InputSet::new(), |set, key| set.with(key, "v"));
    let filled = template.substitute(&inputs);
    let _ = filled.validate_yaml();
    let _ = template.extract(&filled.content);
    let _ = template.extract(text);
});
