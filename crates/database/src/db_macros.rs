#[macro_export]
macro_rules! define_current_read_commands {
    ($struct_name:ident) => {
        pub struct $struct_name<'a> {
            cmds: &'a mut $crate::DieselConnection,
        }

        impl<'a> $struct_name<'a> {
            pub fn new(cmds: &'a mut $crate::DieselConnection) -> Self {
                Self { cmds }
            }

            pub fn conn(&mut self) -> &mut $crate::DieselConnection {
                self.cmds
            }
        }
    };
}

#[macro_export]
macro_rules! define_current_write_commands {
    ($struct_name:ident) => {
        pub struct $struct_name<'a> {
            cmds: &'a mut $crate::DieselConnection,
        }

        impl<'a> $struct_name<'a> {
            pub fn new(cmds: &'a mut $crate::DieselConnection) -> Self {
                Self { cmds }
            }

            pub fn read(&mut self) -> $crate::current::read::CurrentReadCommands<'_> {
                $crate::current::read::CurrentReadCommands::new(self.cmds)
            }

            pub fn conn(&mut self) -> &mut $crate::DieselConnection {
                self.cmds
            }
        }
    };
}
