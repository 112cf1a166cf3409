use crumb::{Machine, VmConfig, VERSION};

fn main() {
    println!("Crumb VM v{}", VERSION);

    let mut machine = Machine::with_config(VmConfig::default().with_trace(true));

    println!("\nPushing scalars 0, 1 and 2 onto the stack.");
    for value in 0..3 {
        if let Err(e) = machine.push_scalar(value) {
            eprintln!("Failed to push scalar: {}", e);
            return;
        }
    }

    println!("Combining the top two scalars into a pair.");
    if let Err(e) = machine.allocate_pair() {
        eprintln!("Failed to allocate pair: {}", e);
        return;
    }

    println!("Combining the remaining scalar and the pair into another pair.");
    if let Err(e) = machine.allocate_pair() {
        eprintln!("Failed to allocate pair: {}", e);
        return;
    }

    println!(
        "There are now {} roots on the stack and {} live objects.",
        machine.root_count(),
        machine.live_object_count()
    );

    println!("\nPopping the last root, so nothing is reachable anymore.");
    if let Err(e) = machine.pop_root() {
        eprintln!("Failed to pop root: {}", e);
        return;
    }

    println!("Triggering garbage collection (should free everything)...");
    let stats = machine.collect();
    println!(
        "Reclaimed {} objects; {} live, next threshold {}.",
        stats.reclaimed, stats.live, stats.next_threshold
    );

    println!(
        "There are now {} roots on the stack and {} live objects.",
        machine.root_count(),
        machine.live_object_count()
    );
}
