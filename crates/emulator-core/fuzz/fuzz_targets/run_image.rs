#![no_main]

use libfuzzer_sys::fuzz_target;
use w16_core::{
    disassemble_word, BinaryImage, BufferedConsole, CoreConfig, Decoder, Machine, Profile,
};

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let profile = if selector & 1 == 0 {
        Profile::Basic
    } else {
        Profile::Extended
    };

    let image = BinaryImage::from_bytes(rest, profile.program_capacity());
    for &word in image.words() {
        let _ = Decoder::decode(profile, word);
        let _ = disassemble_word(profile, word);
    }

    // Arbitrary images may loop forever; bound the run.
    let config = CoreConfig::for_profile(profile).with_max_steps(Some(4096));
    let mut machine = Machine::new(config, image);
    let mut console = BufferedConsole::with_inputs(["1", "x", "-7"]);
    let _ = machine.run(&mut console);
});
