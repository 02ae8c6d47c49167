#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Any byte stream loads as a symbol file, and saving it back
    // reproduces the same ids
    let Ok(mut table) = cxi::symbols::SymbolTable::new() else {
        return;
    };
    if table.load(&mut &data[..]).is_err() {
        return;
    }

    let mut saved = Vec::new();
    table.save(&mut saved).unwrap();

    let mut reloaded = cxi::symbols::SymbolTable::new().unwrap();
    reloaded.load(&mut &saved[..]).unwrap();
    assert!(table.iter().eq(reloaded.iter()));
});
