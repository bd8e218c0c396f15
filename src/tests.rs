#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::interconnect::{outputs, run, run_with_inputs, Input, Interconnect};
    use crate::memory::{Memory, MemoryRW};

    const QUINE: &str = "109,1,204,-1,1001,100,1,100,1008,100,16,101,1006,101,0,99";

    const COMPARE_TO_8: &str = "3,21,1008,21,8,20,1005,20,22,107,8,21,20,1006,20,31,\
        1106,0,36,98,0,0,1002,21,125,20,4,20,1105,1,46,104,999,1105,1,46,1101,1000,1,20,\
        4,20,1105,1,46,98,99";

    fn exec(program: &str, input: i64) -> i64 {
        let memory = Memory::parse(program).unwrap();
        run(&memory, input).unwrap()
    }

    #[test]
    fn halt_only() {
        let memory = Memory::parse("99").unwrap();
        let mut ctx = Interconnect::new(memory.clone(), Input::Fixed(5));
        assert!(ctx.run_to_halt().unwrap().is_empty());
        assert_eq!(ctx.cpu.memory, memory);
        assert_eq!(exec("99", 5), 0);
    }

    #[test]
    fn add_in_place() {
        let memory = Memory::parse("1,0,0,0,99").unwrap();
        let mut ctx = Interconnect::new(memory, Input::Fixed(0));
        ctx.run_to_halt().unwrap();
        assert_eq!(ctx.cpu.read(0).unwrap(), 2);
    }

    #[test]
    fn multiply_beyond_code() {
        let memory = Memory::parse("2,4,4,5,99,0").unwrap();
        let mut ctx = Interconnect::new(memory, Input::Fixed(0));
        ctx.run_to_halt().unwrap();
        assert_eq!(ctx.cpu.read(5).unwrap(), 9801);
    }

    #[test]
    fn echo_input() {
        assert_eq!(exec("3,0,4,0,99", 7), 7);
    }

    #[test]
    fn immediate_multiply() {
        assert_eq!(exec("1102,34,34,7,4,7,99,0", 0), 1156);
    }

    #[test]
    fn fixed_input_reused() {
        // Two input instructions, both observe the same value
        assert_eq!(exec("3,0,3,1,1,0,1,2,4,2,99", 6), 12);
    }

    #[test]
    fn last_output_wins() {
        assert_eq!(exec("104,1,104,2,104,3,99", 0), 3);
    }

    #[test]
    fn self_modifying() {
        // Writes 104 over the halt at address 4, then outputs 77
        assert_eq!(exec("1101,100,4,4,99,77,99", 0), 77);
    }

    #[test]
    fn quine() {
        let memory = Memory::parse(QUINE).unwrap();
        let expected: Vec<i64> = QUINE.split(',').map(|t| t.parse().unwrap()).collect();
        assert_eq!(outputs(&memory, 0).unwrap(), expected);
    }

    #[test]
    fn large_numbers() {
        assert_eq!(exec("104,1125899906842624,99", 0), 1125899906842624);
        let value = exec("1102,34915192,34915192,7,4,7,99,0", 0);
        assert_eq!(value.to_string().len(), 16);
        assert_eq!(value, 1219070632396864);
    }

    #[test]
    fn relative_base_read() {
        // rb = 2000 + 19, then output mem[rb - 34]
        let memory = Memory::parse("109,2000,109,19,21101,55,0,-34,204,-34,99").unwrap();
        assert_eq!(run(&memory, 0).unwrap(), 55);
    }

    #[test]
    fn equal_to_8() {
        assert_eq!(exec("3,9,8,9,10,9,4,9,99,-1,8", 8), 1);
        assert_eq!(exec("3,9,8,9,10,9,4,9,99,-1,8", 7), 0);
        assert_eq!(exec("3,3,1108,-1,8,3,4,3,99", 8), 1);
        assert_eq!(exec("3,3,1108,-1,8,3,4,3,99", 9), 0);
    }

    #[test]
    fn less_than_8() {
        assert_eq!(exec("3,9,7,9,10,9,4,9,99,-1,8", 5), 1);
        assert_eq!(exec("3,9,7,9,10,9,4,9,99,-1,8", 8), 0);
        assert_eq!(exec("3,3,1107,-1,8,3,4,3,99", -3), 1);
        assert_eq!(exec("3,3,1107,-1,8,3,4,3,99", 10), 0);
    }

    #[test]
    fn jumps() {
        assert_eq!(exec("3,12,6,12,15,1,13,14,13,4,13,99,-1,0,1,9", 0), 0);
        assert_eq!(exec("3,12,6,12,15,1,13,14,13,4,13,99,-1,0,1,9", 4), 1);
        assert_eq!(exec("3,3,1105,-1,9,1101,0,0,12,4,12,99,1", 0), 0);
        assert_eq!(exec("3,3,1105,-1,9,1101,0,0,12,4,12,99,1", -2), 1);
    }

    #[test]
    fn compare_to_8() {
        assert_eq!(exec(COMPARE_TO_8, 7), 999);
        assert_eq!(exec(COMPARE_TO_8, 8), 1000);
        assert_eq!(exec(COMPARE_TO_8, 9), 1001);
    }

    #[test]
    fn each_run_starts_fresh() {
        // Increments address 7 and outputs it; runs must not see each other's writes
        let memory = Memory::parse("1001,7,1,7,4,7,99,10").unwrap();
        assert_eq!(run(&memory, 0).unwrap(), 11);
        assert_eq!(run(&memory, 0).unwrap(), 11);
    }

    #[test]
    fn queued_inputs() {
        let memory = Memory::parse("3,0,3,1,1,0,1,2,4,2,99").unwrap();
        assert_eq!(run_with_inputs(&memory, &[6, 10]).unwrap(), vec![16]);
    }

    #[test]
    fn unknown_opcode_aborts() {
        let memory = Memory::parse("104,1,12,99").unwrap();
        assert!(matches!(
            run(&memory, 0),
            Err(Error::UnknownOpcode { word: 12, address: 2 })
        ));
    }

    #[test]
    fn jump_to_negative_address_aborts() {
        let memory = Memory::parse("1105,1,-4,99").unwrap();
        assert!(matches!(run(&memory, 0), Err(Error::NegativeAddress(-4))));
    }
}
