#[macro_use]
extern crate clap;

use clap::Arg;
use nibvm::RegisterId;

const GENERAL_PURPOSE_REGISTERS: &[RegisterId] = &[
    RegisterId::R1,
    RegisterId::R2,
    RegisterId::R3,
    RegisterId::R4,
    RegisterId::R5,
    RegisterId::R6,
    RegisterId::R7,
    RegisterId::R8,
];

fn main() {
    let matches = app_from_crate!()
        .arg(
            Arg::with_name("INPUT")
                .help("Sets the assembly source file to run")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("stack_size")
                .short("s")
                .long("stack-size")
                .takes_value(true)
                .value_name("BYTES")
                .default_value("65535")
                .help("Sets the size of the VM's stack in bytes"),
        )
        .get_matches();

    let input = matches.value_of("INPUT").unwrap();
    let stack_size = value_t!(matches.value_of("stack_size"), usize).unwrap_or_else(|e| e.exit());

    match nib::run_file(input, stack_size) {
        Ok((executor, exit)) => {
            println!("{}", exit);
            for reg in GENERAL_PURPOSE_REGISTERS {
                println!("{} = {}", reg.name(), executor.register(*reg));
            }
        }
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    }
}
